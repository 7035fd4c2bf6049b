use shopcart_core::{DomainError, DomainResult, Entity, ItemId, ItemKey, Price};

/// Entity: a catalog record.
///
/// Identity is the generated `ItemId`; the title is unique within an
/// [`crate::Inventory`] under case-insensitive comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    id: ItemId,
    title: String,
    price: Price,
    stock: u64,
}

impl Item {
    pub fn new(id: ItemId, title: impl Into<String>, price: Price, stock: u64) -> DomainResult<Self> {
        let title = title.into();
        validate_title(&title)?;
        Ok(Self {
            id,
            title,
            price,
            stock,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::from_title(&self.title)
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub(crate) fn overwrite(&mut self, draft: ItemDraft) {
        self.title = draft.title;
        self.price = draft.price;
        self.stock = draft.stock;
    }

    /// Take one unit out of stock. Returns `false` (and leaves stock untouched)
    /// when nothing is left.
    pub(crate) fn take_one(&mut self) -> bool {
        match self.stock.checked_sub(1) {
            Some(rest) => {
                self.stock = rest;
                true
            }
            None => false,
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Already-decoded `{title, price, stock}` triple for catalog writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub title: String,
    pub price: Price,
    pub stock: u64,
}

impl ItemDraft {
    pub fn new(title: impl Into<String>, price: Price, stock: u64) -> Self {
        Self {
            title: title.into(),
            price,
            stock,
        }
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::from_title(&self.title)
    }

    pub(crate) fn validate(&self) -> DomainResult<()> {
        validate_title(&self.title)
    }
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("title cannot be empty"));
    }
    Ok(())
}
