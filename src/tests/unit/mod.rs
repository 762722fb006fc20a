mod app_flow_tests;
mod wire_error_tests;
