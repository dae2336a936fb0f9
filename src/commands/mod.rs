pub mod add;
pub mod complete;
pub mod create;
pub mod events;
pub mod lists;
pub mod show;
