pub mod common;
pub mod health;
pub mod message;
pub mod user;

#[cfg(test)]
mod test;
