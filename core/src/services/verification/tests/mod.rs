//! Unit tests for the verification module

mod mocks;
