mod authenticate;
mod credential;
mod fetch;
mod helpers;
