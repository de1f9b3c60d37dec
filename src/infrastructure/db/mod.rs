pub mod pool;

#[cfg(test)]
pub mod fixtures;

#[cfg(test)]
pub mod memory;
