mod interact;
mod render;
