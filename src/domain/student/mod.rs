pub mod dto;
pub mod entity;
pub mod handler;
pub mod service;
