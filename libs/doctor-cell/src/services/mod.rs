pub mod directory;
pub mod selection;
pub mod render;

pub use directory::DoctorDirectory;
pub use selection::DirectorySelection;
