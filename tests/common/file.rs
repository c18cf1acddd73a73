use derive_new::new;
use std::path::{Path, PathBuf};

/// A CSV file to import as a table
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct TableSpec {
    pub name: String,
    pub content: String,
}

impl TableSpec {
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.csv", self.name))
    }
}

pub fn write_table_file(dir: &Path, table: &TableSpec) -> PathBuf {
    let path = table.path_in(dir);
    std::fs::write(&path, &table.content)
        .unwrap_or_else(|e| panic!("Failed to write file {:?}: {}", path, e));
    path
}

/// A table with a random number of rows of fake people
pub fn generate_people_table(name: &str) -> TableSpec {
    use fake::Fake;
    use fake::faker::internet::en::FreeEmail;
    use fake::faker::name::en::Name;

    let rows = (1..=(1..6).fake::<usize>())
        .map(|id| {
            format!(
                "{},{},{}",
                id,
                Name().fake::<String>().replace(',', " "),
                FreeEmail().fake::<String>()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    TableSpec::new(name.to_string(), format!("id,name,email\n{rows}"))
}
