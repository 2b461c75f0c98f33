mod controls;
mod full_page;
mod lifecycle;
mod pointer;
mod update_step;
mod viewer;
mod viewer_config;

pub use controls::ControlAnchor;
pub use lifecycle::{OpenToken, SLOW_OPEN_MESSAGE, SLOW_OPEN_NOTICE_MS};
pub use viewer::Viewer;
pub use viewer_config::ViewerConfig;
