pub mod check;
pub mod download;
pub mod upload;
pub mod version;

pub use check::Check;
pub use download::Download;
pub use upload::Upload;
pub use version::Version;
