//! Sample content seeding.
//!
//! An explicit setup-phase step: `ensure_seeded` runs once at process
//! start (or via `folio seed`) and writes the bundled sample posts for
//! any slug whose file is absent. The read path never creates files.

use folio_core::Result;
use std::path::Path;
use tracing::info;

struct SamplePost {
    slug: &'static str,
    document: &'static str,
}

const SAMPLE_POSTS: &[SamplePost] = &[
    SamplePost {
        slug: "getting-started-with-nextjs-typescript",
        document: r#"---
title: "Getting Started with Next.js and TypeScript"
date: "2023-04-15"
excerpt: "A comprehensive guide to setting up a new project with Next.js and TypeScript, including best practices and common pitfalls to avoid."
coverImage: "/placeholder.svg?height=400&width=800"
readTime: "8 min read"
tags: ["Next.js", "TypeScript", "Web Development"]
---

# Getting Started with Next.js and TypeScript

Next.js is a powerful React framework that enables functionality such as
server-side rendering and static site generation. When combined with
TypeScript, it provides a robust development experience with type safety
and improved developer tooling.

## Setting Up Your Project

To create a new Next.js project with TypeScript, you can use the following
command:

```bash
npx create-next-app@latest my-app --typescript
```

This will create a new Next.js project with TypeScript configuration
already set up for you.

## Type Safety with TypeScript

TypeScript provides type checking for your JavaScript code, catching a
whole class of bugs before they ship. Typed props, typed API routes, and
typed data fetching make refactors far less risky as a project grows.

## Conclusion

Next.js and TypeScript provide a powerful combination for building modern
web applications. Check the official documentation for both projects for
more detailed information and advanced features.
"#,
    },
    SamplePost {
        slug: "building-portfolio-with-tailwind",
        document: r#"---
title: "Building a Portfolio with Tailwind CSS"
date: "2023-03-22"
excerpt: "Learn how to create a modern, responsive portfolio website using Tailwind CSS and React components."
coverImage: "/placeholder.svg?height=400&width=800"
readTime: "6 min read"
tags: ["Tailwind CSS", "React", "Portfolio"]
---

# Building a Portfolio with Tailwind CSS

Creating a professional portfolio website is essential for showcasing your
work and skills. Tailwind CSS provides a utility-first approach that makes
it easy to build beautiful, responsive designs without writing custom CSS.

## Setting Up Tailwind CSS

```bash
npm install -D tailwindcss postcss autoprefixer
npx tailwindcss init -p
```

Then add the Tailwind directives to your global stylesheet and start
composing layouts from utility classes.

## Responsive Design

Tailwind's breakpoint prefixes (`sm:`, `md:`, `lg:`, `xl:`) make it simple
to go from a single-column mobile layout to a multi-column desktop grid
without leaving your markup.

## Conclusion

By leveraging utility classes, you can create responsive, modern designs
that showcase your work effectively.
"#,
    },
    SamplePost {
        slug: "power-of-server-components",
        document: r#"---
title: "The Power of Server Components in Next.js"
date: "2023-02-10"
excerpt: "Exploring the benefits and use cases of Server Components in Next.js applications for improved performance and developer experience."
coverImage: "/placeholder.svg?height=400&width=800"
readTime: "10 min read"
tags: ["Next.js", "Server Components", "Performance"]
---

# The Power of Server Components in Next.js

React Server Components represent a paradigm shift in how we build React
applications. With Next.js adopting this technology, developers now have
powerful new tools to improve performance and user experience.

## What Are Server Components?

Server Components render exclusively on the server. They have direct
access to server-side resources, never ship JavaScript to the client, and
can fetch data without client-side waterfalls.

## Performance Benefits

1. Reduced JavaScript bundle size
2. Faster initial page load via streaming
3. Improved SEO, since content is in the initial HTML
4. No client-side fetch waterfalls

## Conclusion

Consider which parts of your application benefit from Server Components
and which require client-side interactivity. The right balance leads to
optimal performance and user experience.
"#,
    },
];

/// Create the content directory and write any sample post whose file is
/// absent. Existing files are never overwritten. Returns the number of
/// files written.
pub fn ensure_seeded(dir: &Path) -> Result<usize> {
    std::fs::create_dir_all(dir)?;

    let mut written = 0;
    for sample in SAMPLE_POSTS {
        let path = dir.join(format!("{}.md", sample.slug));
        if !path.exists() {
            std::fs::write(&path, sample.document)?;
            info!("seeded sample post {}", sample.slug);
            written += 1;
        }
    }

    Ok(written)
}
