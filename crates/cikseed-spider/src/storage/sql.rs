//////////////////////////////////////////////////////////////////
// schema
//////////////////////////////////////////////////////////////////

/// `company` is the master table; one row per issuer, keyed by its canonical CIK.
pub(crate) static CREATE_COMPANY: &'static str = "
    CREATE TABLE company (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) UNIQUE NOT NULL,
        cik VARCHAR(10) UNIQUE NOT NULL
    )
";

/// Each ticker belongs to exactly one company, and disappears with it.
pub(crate) static CREATE_TICKER: &'static str = "
    CREATE TABLE ticker (
        id SERIAL PRIMARY KEY,
        company_id INTEGER REFERENCES company(id) ON DELETE CASCADE,
        value VARCHAR(20) UNIQUE NOT NULL,
        exchange VARCHAR(50)
    )
";

pub(crate) static CREATE_FILING: &'static str = "
    CREATE TABLE filing (
        id SERIAL PRIMARY KEY,
        company_id INTEGER REFERENCES company(id) ON DELETE CASCADE,
        sec_id VARCHAR(50) UNIQUE NOT NULL,
        form VARCHAR(20) NOT NULL,
        original_file VARCHAR(200) NOT NULL,
        filing_date TIMESTAMP DEFAULT NULL,
        report_date TIMESTAMP DEFAULT NULL,
        acceptance_date TIMESTAMP DEFAULT NULL,
        last_modified_date TIMESTAMP DEFAULT NULL
    )
";

/// Keyword sets naming a financial statement, e.g. `{balance, sheet}`.
pub(crate) static CREATE_HEADER: &'static str = "
    CREATE TABLE header (
        id SERIAL PRIMARY KEY,
        values VARCHAR(100)[] UNIQUE NOT NULL
    )
";

/// A table found inside a filing; `table` is reserved, hence the quotes.
pub(crate) static CREATE_TABLE: &'static str = "
    CREATE TABLE \"table\" (
        id SERIAL PRIMARY KEY,
        filing_id INTEGER REFERENCES filing(id) ON DELETE CASCADE,
        index INTEGER,
        header_id INTEGER REFERENCES header(id) ON DELETE CASCADE,
        header_leaves INTEGER DEFAULT NULL,
        header_letters INTEGER DEFAULT NULL,
        UNIQUE (filing_id, index)
    )
";

pub(crate) static CREATE_KEYWORD: &'static str = "
    CREATE TABLE keyword (
        id SERIAL PRIMARY KEY,
        value TEXT UNIQUE NOT NULL
    )
";

pub(crate) static CREATE_TABLE_KEYWORD_MAPPING: &'static str = "
    CREATE TABLE table_keyword_mapping (
        table_id INTEGER REFERENCES \"table\"(id) ON DELETE CASCADE,
        keyword_id INTEGER REFERENCES keyword(id) ON DELETE CASCADE,
        UNIQUE (table_id, keyword_id)
    )
";

/// Creation order matters; every table follows the ones it references.
pub(crate) static SCHEMA: [(&'static str, &'static str); 7] = [
    ("company", CREATE_COMPANY),
    ("ticker", CREATE_TICKER),
    ("filing", CREATE_FILING),
    ("header", CREATE_HEADER),
    ("table", CREATE_TABLE),
    ("keyword", CREATE_KEYWORD),
    ("table_keyword_mapping", CREATE_TABLE_KEYWORD_MAPPING),
];

//////////////////////////////////////////////////////////////////
// inserts
//////////////////////////////////////////////////////////////////

pub(crate) static INSERT_COMPANY: &'static str = "
    INSERT INTO company (name, cik)
    VALUES ($1, $2)
    RETURNING id
";

pub(crate) static INSERT_TICKER: &'static str = "
    INSERT INTO ticker (company_id, value, exchange)
    VALUES ($1, $2, $3)
";

pub(crate) static INSERT_HEADER: &'static str = "
    INSERT INTO header (values)
    VALUES ($1)
";
