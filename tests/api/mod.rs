mod countries_tests;
mod health_tests;
mod persons_tests;
