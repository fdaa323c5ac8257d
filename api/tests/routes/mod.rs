mod app_test;
mod otp;
