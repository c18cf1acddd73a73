use crate::areas::repository::Repository;

impl Repository {
    pub fn add_remote(&self, name: &str, url: &str) -> anyhow::Result<()> {
        let mut config = self.config()?;
        config.add_remote(name, url)?;
        self.save_config(&config)
    }
}
