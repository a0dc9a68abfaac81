// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod empty_state;
pub mod form_select;
pub mod input;
pub mod page_header;
pub mod search_bar;
pub mod skeleton;
pub mod stat_card;
pub mod textarea;

// Primitive wrappers
pub mod dropdown_menu;
pub mod toast;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use dropdown_menu::*;
pub use empty_state::*;
pub use form_select::*;
pub use input::*;
pub use page_header::*;
pub use search_bar::*;
pub use skeleton::*;
pub use stat_card::*;
pub use textarea::*;
pub use toast::*;
