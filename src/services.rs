pub(crate) mod practicum;
pub(crate) mod telegram;
