pub mod blog_handlers;
pub mod company_handlers;
pub mod system_handlers;

pub use blog_handlers::*;
pub use company_handlers::*;
pub use system_handlers::*;
