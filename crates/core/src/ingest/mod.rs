pub mod hasher;
pub mod locator;
