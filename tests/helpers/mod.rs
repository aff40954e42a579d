pub mod mock_config;
pub mod mock_repo;
