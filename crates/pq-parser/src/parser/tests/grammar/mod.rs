mod binary_tests;
mod expressions_tests;
mod types_tests;
