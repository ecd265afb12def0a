mod instance;
mod snapshot;
