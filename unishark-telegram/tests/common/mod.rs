#![allow(dead_code)]

pub mod fake_api;
pub mod mock_bot;
