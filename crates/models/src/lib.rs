pub mod errors;
pub mod db;
pub mod venue;
pub mod artist;
pub mod show;
pub mod category;
pub mod question;
