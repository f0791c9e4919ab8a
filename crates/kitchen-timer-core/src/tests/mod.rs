mod support;
mod timer;
