pub mod draw_entries;
pub mod draw_rounds;
pub mod users;

pub use draw_entries::Entity as DrawEntries;
pub use draw_entries::Model as DrawEntry;
pub use draw_rounds::Entity as DrawRounds;
pub use draw_rounds::Model as DrawRound;
pub use users::Entity as Users;
pub use users::Model as User;
