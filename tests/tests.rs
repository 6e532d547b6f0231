mod find;
mod props;
