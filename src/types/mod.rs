pub mod fragment;
pub mod frames;
pub mod location;
pub mod raw_weather;
pub mod weather_code;
pub mod weather_data;
