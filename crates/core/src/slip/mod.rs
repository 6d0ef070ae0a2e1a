//! Salary-slip rendering.

mod renderer;

pub use renderer::{render_salary_slip, SlipData};
