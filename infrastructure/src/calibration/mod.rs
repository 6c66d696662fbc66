//! Backend calibration file editing.

mod file_applier;

pub use file_applier::{FileCalibrationApplier, rewrite_constants};
