mod carpark;
mod favourites;
