use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Query string di GET /messages (?page=&size=). I parametri assenti prendono i default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl PageQuery {
    /// Applica i default (pagina 0, dimensione 10). `None` se size = 0.
    pub fn into_request(self) -> Option<PageRequest> {
        PageRequest::new(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// Richiesta di pagina già validata: page >= 0, size >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Option<Self> {
        if size == 0 {
            return None;
        }
        Some(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Numero di righe da saltare prima di questa pagina.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Envelope paginato: una fetta ordinata di elementi più i totali.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u64,
    /// Indice della pagina (da 0)
    pub number: u32,
    pub size: u32,
    pub number_of_elements: u64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(u64::from(request.size()));
        let number = request.page();
        Self {
            number_of_elements: content.len() as u64,
            empty: content.is_empty(),
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
            content,
            total_elements,
            total_pages,
            number,
            size: request.size(),
        }
    }
}
