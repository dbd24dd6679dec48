pub mod moving_averages;
