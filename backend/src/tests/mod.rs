pub(crate) mod common;
mod demo_app_test;
