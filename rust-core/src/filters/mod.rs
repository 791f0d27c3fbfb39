//! Window functions and direct-form IIR filtering

pub mod iir;
pub mod windows;

pub use iir::{filtfilt, lfilter, lfilter_reverse, FilterError, IirFilter};
pub use windows::{apply_window, apply_window_to, generate_window, window_power, WindowType};
