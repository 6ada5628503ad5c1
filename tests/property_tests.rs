// Property-based tests for grid geometry and school-hour overlap
mod property;
