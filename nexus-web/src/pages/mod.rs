mod create_post;
mod edit_post;
mod home;
mod post_page;

pub use create_post::CreatePost;
pub use edit_post::EditPost;
pub use home::Home;
pub use post_page::PostPage;
