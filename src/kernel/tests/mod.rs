#[cfg(test)]
mod registry_tests;
