//! Bank accounts grouped under customer accounts.

/// Single account with its raw statement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankAccount {
    pub number: String,
    pub balance: i64,
    pub statement: String,
}

impl BankAccount {
    pub fn new(number: impl Into<String>, balance: i64, statement: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            balance,
            statement: statement.into(),
        }
    }

    pub fn statement(&self) -> String {
        format!("Account {} Statement:\n{}", self.number, self.statement)
    }
}

/// Customer holding accounts, possibly other customer groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerAccount {
    pub customer_name: String,
    pub accounts: Vec<AccountComponent>,
}

impl CustomerAccount {
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            accounts: Vec::new(),
        }
    }

    pub fn add(&mut self, account: impl Into<AccountComponent>) {
        self.accounts.push(account.into());
    }

    pub fn balance(&self) -> i64 {
        self.accounts.iter().map(AccountComponent::balance).sum()
    }

    /// Header line, then each child's statement followed by a newline.
    pub fn statement(&self) -> String {
        let mut consolidated = format!("Consolidated Statement for {}:\n", self.customer_name);
        for account in &self.accounts {
            consolidated.push_str(&account.statement());
            consolidated.push('\n');
        }
        consolidated
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountComponent {
    Bank(BankAccount),
    Customer(CustomerAccount),
}

impl AccountComponent {
    pub fn balance(&self) -> i64 {
        match self {
            AccountComponent::Bank(account) => account.balance,
            AccountComponent::Customer(customer) => customer.balance(),
        }
    }

    pub fn statement(&self) -> String {
        match self {
            AccountComponent::Bank(account) => account.statement(),
            AccountComponent::Customer(customer) => customer.statement(),
        }
    }
}

impl From<BankAccount> for AccountComponent {
    fn from(account: BankAccount) -> Self {
        AccountComponent::Bank(account)
    }
}

impl From<CustomerAccount> for AccountComponent {
    fn from(customer: CustomerAccount) -> Self {
        AccountComponent::Customer(customer)
    }
}
