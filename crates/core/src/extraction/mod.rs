pub mod cropper;
