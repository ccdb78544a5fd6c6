/// Blocking device driver with lifecycle management
pub mod device;
/// Blocking i2c interface code
pub mod interface;
