#![allow(dead_code)]

pub mod cardio_env;
pub mod mock_service;
