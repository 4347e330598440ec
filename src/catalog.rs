//! Front API: type → catalog.
//!
//! Every call builds its own tree and accumulator, so a `Catalog` can be
//! shared across threads and called concurrently.
use crate::aliases::AliasRegistry;
use crate::config::CatalogOptions;
use crate::describe::Describe;
use crate::error::Result;
use crate::field::Field;
use crate::flatten::flatten;
use crate::ir::Shape;
use crate::tree::TreeBuilder;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    options: CatalogOptions,
    aliases: Option<AliasRegistry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CatalogOptions) -> Self {
        Self { options, aliases: None }
    }

    /// Replaces the built-in aliases; start from [`AliasRegistry::builder`] to extend them.
    pub fn with_aliases(mut self, aliases: AliasRegistry) -> Self {
        self.aliases = Some(aliases);
        self
    }

    pub fn options(&self) -> &CatalogOptions {
        &self.options
    }

    pub fn aliases(&self) -> &AliasRegistry {
        match &self.aliases {
            Some(aliases) => aliases,
            None => AliasRegistry::builtin(),
        }
    }

    pub fn fields<T: Describe>(&self) -> Result<Vec<Field>> {
        self.fields_of(&T::shape())
    }

    pub fn fields_of(&self, shape: &Shape) -> Result<Vec<Field>> {
        let tree = TreeBuilder::new(self.aliases(), self.options.max_depth).build(shape)?;
        let fields = flatten(tree, self.options.empty_composites);
        tracing::debug!(type_name = %shape.type_name, leaves = fields.len(), "catalog built");
        Ok(fields)
    }

    pub fn to_json<T: Describe>(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.fields::<T>()?)?)
    }

    pub fn to_json_pretty<T: Describe>(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.fields::<T>()?)?)
    }
}

/// Catalog of `T` with default options and the built-in aliases.
pub fn fields_of<T: Describe>() -> Result<Vec<Field>> {
    Catalog::new().fields::<T>()
}

/// Compact JSON catalog of `T`.
pub fn get_meta<T: Describe>() -> Result<String> {
    Catalog::new().to_json::<T>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmptyComposites;
    use crate::ir::FieldDef;
    use serde_json::json;

    struct Money;
    impl Describe for Money {
        fn shape() -> Shape { Shape::scalar::<Self>("Money") }
    }

    struct Account;
    impl Describe for Account {
        fn shape() -> Shape {
            Shape::composite::<Self>("Account", vec![
                FieldDef::new("id", uuid::Uuid::shape),
                FieldDef::new("balance", Money::shape)
                    .description("Current balance")
                    .default_value("0"),
                FieldDef::new("opened", <chrono::NaiveDate>::shape),
            ])
        }
    }

    #[test]
    fn get_meta_encodes_compact_json() {
        let out: serde_json::Value = serde_json::from_str(&get_meta::<Account>().unwrap()).unwrap();
        assert_eq!(out, json!([
            { "name": "id", "type": "uuid" },
            {
                "name": "balance",
                "type": "Money",
                "description": "Current balance",
                "default": "0",
            },
            { "name": "opened", "type": "timestamp" },
        ]));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let catalog = Catalog::new();
        assert_eq!(catalog.to_json::<Account>().unwrap(), catalog.to_json::<Account>().unwrap());
    }

    #[test]
    fn custom_aliases_apply() {
        let aliases = AliasRegistry::builder().alias::<Money>("decimal").build();
        let fields = Catalog::new().with_aliases(aliases).fields::<Account>().unwrap();
        assert_eq!(fields[1].type_, "decimal");
        assert_eq!(fields[0].type_, "uuid");
    }

    #[test]
    fn options_are_carried() {
        let opts = CatalogOptions { max_depth: 1, empty_composites: EmptyComposites::Skip };
        let catalog = Catalog::with_options(opts.clone());
        assert_eq!(catalog.options(), &opts);
        assert!(catalog.fields::<Account>().is_ok());
        assert!(catalog.fields::<Vec<Account>>().is_err());
    }

    #[test]
    fn concurrent_calls_do_not_interfere() {
        let catalog = Catalog::new();
        let expected = catalog.to_json::<Account>().unwrap();
        std::thread::scope(|s| {
            let handles: Vec<_> =
                (0..4).map(|_| s.spawn(|| catalog.to_json::<Account>().unwrap())).collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), expected);
            }
        });
    }
}
