//! Demonstration of a reducer-driven store managing a todo list

use tinstore::configure_store;

#[derive(Clone, Debug)]
struct TodoItem {
    id: usize,
    title: String,
    completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum TodoFilter {
    All,
    Active,
    Completed,
}

#[derive(Clone, Debug)]
struct AppState {
    todos: Vec<TodoItem>,
    filter: TodoFilter,
}

#[derive(Debug)]
enum Action {
    Add(&'static str),
    Toggle(usize),
    SetFilter(TodoFilter),
}

impl AppState {
    fn new() -> Self {
        Self {
            todos: Vec::new(),
            filter: TodoFilter::All,
        }
    }

    fn filtered_todos(&self) -> Vec<&TodoItem> {
        match self.filter {
            TodoFilter::All => self.todos.iter().collect(),
            TodoFilter::Active => self.todos.iter().filter(|t| !t.completed).collect(),
            TodoFilter::Completed => self.todos.iter().filter(|t| t.completed).collect(),
        }
    }

    fn stats(&self) -> (usize, usize, usize) {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|t| t.completed).count();
        (total, total - completed, completed)
    }
}

fn todos(state: Option<&AppState>, action: &Action) -> AppState {
    let mut next = state.cloned().unwrap_or_else(AppState::new);
    match action {
        Action::Add(title) => {
            let id = next.todos.len();
            next.todos.push(TodoItem {
                id,
                title: title.to_string(),
                completed: false,
            });
        }
        Action::Toggle(id) => {
            if let Some(todo) = next.todos.iter_mut().find(|t| t.id == *id) {
                todo.completed = !todo.completed;
            }
        }
        Action::SetFilter(filter) => next.filter = filter.clone(),
    }
    next
}

fn print_todos(state: Option<&AppState>) {
    let Some(state) = state else {
        println!("   (no state yet)");
        return;
    };
    for todo in state.filtered_todos() {
        let status = if todo.completed { "✓" } else { " " };
        println!("   [{}] {}", status, todo.title);
    }
}

fn main() {
    println!("=== Store Example: Todo App ===\n");

    let store = configure_store(todos, None);

    println!("1. Setting up subscriber");
    let unsubscribe = store.subscribe({
        let store = store.downgrade();
        move || {
            if let Some(state) = store.upgrade().and_then(|store| store.get_state()) {
                let (total, active, completed) = state.stats();
                println!(
                    "   [Store Update] Total: {}, Active: {}, Completed: {}",
                    total, active, completed
                );
            }
        }
    });

    println!("\n2. Adding todos");
    store.dispatch(Action::Add("Learn Rust"));
    store.dispatch(Action::Add("Build a state container"));
    store.dispatch(Action::Add("Write documentation"));

    println!("\n3. Current todos:");
    store.read(print_todos);

    println!("\n4. Completing the first two todos");
    store.dispatch(Action::Toggle(0));
    store.dispatch(Action::Toggle(1));

    println!("\n5. Unsubscribing and filtering to active todos");
    unsubscribe.unsubscribe();
    store.dispatch(Action::SetFilter(TodoFilter::Active));
    store.read(print_todos);

    println!("\n6. Completed todos:");
    store.dispatch(Action::SetFilter(TodoFilter::Completed));
    store.read(print_todos);

    println!("\n✓ Example complete!");
}
