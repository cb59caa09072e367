// AI module for the computer-controlled right paddle

mod tracker;

pub use tracker::track_ball;
