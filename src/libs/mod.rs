pub mod align;
pub mod dist;
pub mod io;
pub mod score;
pub mod seq;
pub mod upgma;
