
pub mod vec;
pub mod freezed;

#[cfg(test)]
pub(crate) mod scripted;
