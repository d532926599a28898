pub mod beat;
pub mod card;
pub mod combination;
pub mod deck;
pub mod hand;
pub mod order;
pub mod partition;
pub mod player;
pub mod rank;
pub mod score;
pub mod suit;
pub mod trick;
