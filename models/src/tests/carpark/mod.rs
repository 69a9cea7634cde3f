mod builder;
mod list;
