pub mod clean;
pub mod convert;
pub mod dock;
pub mod docking_box;
pub mod prepare;
pub mod recenter;
pub mod run;
pub mod summarize;
