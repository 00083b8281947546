use super::types::NewProject;

fn placeholder(text: &str) -> String {
    format!("https://via.placeholder.com/800x450?text={text}")
}

/// Returns the sample projects inserted by `folio seed`.
pub fn sample_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            slug: "personal-portfolio-website".to_string(),
            title: "Personal Portfolio Website".to_string(),
            short_description: "This project is a personal portfolio website built with Next.js and Tailwind CSS to showcase my work and skills.".to_string(),
            image_url: placeholder("Personal+Portfolio+Website"),
            description: Some("This website was built to showcase my work and skills...".to_string()),
            live_demo_url: Some("https://example-portfolio.vercel.app".to_string()),
            github_repo_url: Some("https://github.com/user/portfolio-repo".to_string()),
            screenshots: vec![
                placeholder("Screenshot+1+Portfolio"),
                placeholder("Screenshot+2+Portfolio"),
            ],
        },
        NewProject {
            slug: "to-do-list-app".to_string(),
            title: "To-Do List Application".to_string(),
            short_description: "An application for managing daily tasks with a clean and intuitive interface.".to_string(),
            image_url: placeholder("To-Do+List+App"),
            description: Some("A full-featured to-do list application...".to_string()),
            live_demo_url: Some("https://example-todo.vercel.app".to_string()),
            github_repo_url: Some("https://github.com/user/todo-repo".to_string()),
            screenshots: vec![
                placeholder("Screenshot+1+TODO"),
                placeholder("Screenshot+2+TODO"),
            ],
        },
    ]
}
