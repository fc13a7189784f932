mod errors_tests;
mod grammar;
mod json_serialization_tests;
