/*
[INPUT]:  Module metadata and operator input
[OUTPUT]: Dynamic module forms and their submissions
[POS]:    Form layer - module wiring
[UPDATE]: When adding form modules
*/

mod builder;
mod kind;
mod widget;

pub use builder::{FormNotice, ModuleForm, Submission};
pub use kind::ArgKind;
pub use widget::{ArgWidget, Control, InterfaceOptions, InterfaceSelect, parse_flag};
