pub mod console;
pub mod html;
pub mod junit;
pub mod renderer;
pub mod report_model;
pub mod sink;
