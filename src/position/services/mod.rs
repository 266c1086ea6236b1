pub mod position_sync_service;
