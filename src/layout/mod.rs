pub mod editor;
pub mod preview;
pub mod section;

pub use editor::{
    BannerField, EditorSession, add_banner, add_section, normalize, remove_banner,
    remove_section, reorder, set_section_field, update_banner_field,
};
pub use preview::{Block, CarouselCursor, RenderPlan, Slide, View, Viewport, render, render_store};
pub use section::{SectionField, create_section, set_field};
