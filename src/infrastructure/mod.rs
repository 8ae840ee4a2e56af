pub mod json_file_repo;
pub mod memory_repo;
