// Canned tutor replies.

pub const GREETING: &str = "Hi! I'm your AI coding tutor. I'm here to help you with any programming questions, explain concepts, provide hints, or help debug your code. What would you like to learn about today?";

pub const LISTS: &str = "Great question about lists! 📝

Lists in Python are ordered collections that can store multiple items. Here are the key concepts:

**Creating Lists:**
- Use square brackets: `my_list = [1, 2, 3]`
- Can store different types: `mixed = [\"hello\", 42, True]`

**Accessing Elements:**
- Use indexing: `my_list[0]` gets the first element
- Negative indexing: `my_list[-1]` gets the last element

**Common Operations:**
- Add items: `my_list.append(4)`
- Remove items: `my_list.remove(2)`
- Get length: `len(my_list)`

Would you like me to show you a specific example or explain any of these concepts in more detail?";

pub const DEBUGGING: &str = "I'd be happy to help debug your code! 🐛

To help you effectively, please share:

1. **Your code** - paste the code that's not working
2. **Error message** - if there's an error, what does it say?
3. **Expected vs Actual** - what should happen vs what's happening
4. **Context** - what are you trying to accomplish?

Common Python debugging tips:
- Check for indentation errors (Python is sensitive to spacing)
- Look for missing colons : after if/for/while statements
- Verify variable names are spelled correctly
- Make sure you're using the right data types

Share your code and I'll help you find the issue! 💻";

pub const HINT: &str = "I understand you're looking for a hint! 💡

Instead of giving you the full solution, let me guide your thinking:

**General Problem-Solving Approach:**
1. **Break it down** - What smaller steps can you identify?
2. **What do you know?** - What concepts have you already learned that might apply?
3. **Start simple** - Can you solve a simpler version first?
4. **Trace through** - What should happen step by step?

If you share the specific exercise you're working on, I can give you a more targeted hint that will help you learn while still letting you figure it out yourself!

What problem are you working on?";

pub const EXERCISE: &str = "Perfect! Practice is key to learning programming! 🎯

Here's a beginner-friendly exercise for you:

**List Manipulation Challenge:**

Create a program that:
1. Makes a list of your 5 favorite foods
2. Prints the first and last items
3. Adds a new food to the end
4. Removes the second item
5. Prints the final list and its length

**Concepts you'll practice:**
- List creation
- Indexing (positive and negative)
- append() method
- remove() or pop() method
- len() function

Try it out and let me know how it goes! If you get stuck, I'm here to help. 🚀";

pub const HELLO: &str = "Hello! Great to see you're ready to learn! 👋

I'm here to help you master programming concepts. I can:

- **Explain concepts** clearly with examples
- **Help debug** your code when something's not working
- **Provide hints** when you're stuck (without spoiling the solution)
- **Give practice exercises** to reinforce your learning
- **Answer questions** about programming in general

What would you like to start with today? Feel free to ask me anything about programming!";

pub const CLARIFY: &str = "That's a great question! 🤔

I want to make sure I give you the most helpful response. Could you be a bit more specific about what you'd like to know?

For example:
- Are you asking about a specific programming concept?
- Do you have code that's not working as expected?
- Are you looking for help with a particular exercise?
- Would you like me to explain something in a different way?

I'm here to help you learn effectively, so don't hesitate to ask follow-up questions! 📚";
