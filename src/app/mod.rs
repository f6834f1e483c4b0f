pub mod inventory_service;
