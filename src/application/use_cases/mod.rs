pub mod documents;
pub mod ingest;
pub mod meetings;

#[cfg(test)]
pub(crate) mod test_support;
