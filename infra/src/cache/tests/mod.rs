//! Cache tests

mod flow_store_tests;
